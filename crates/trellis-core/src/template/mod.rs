//! Template execution
//!
//! A [`Template`] owns one render pass over one body file. It binds the
//! render context, captures the body's output, follows `layout()` into a
//! parent file and notifies the engine at every lifecycle step.
//!
//! ## Body vocabulary
//!
//! - Lookups: `{{ key }}`, `{{ a.b.0 }}`
//! - Calls: `{{ filter("trim|upper", title) }}`, `{{ insert("nav", {active: page}) }}`
//! - Loops: `{{ each items |item| }} ... {{ /each }}`
//! - Sections: `{{ section "head" }} ... {{ /section }}`
//! - Escapes: `\{{literal}}`
//!
//! Any call name that is not a built-in operation is passed to the command
//! dispatcher as a helper.

mod alias;
pub mod body;
mod call;
pub mod error;
mod event;
mod executor;

pub use alias::Alias;
pub use body::{BodyInterpreter, Scope};
pub use call::Operation;
pub use error::TemplateError;
pub use event::{names, TemplateEvent};
pub use executor::{Context, Supply, Template};
