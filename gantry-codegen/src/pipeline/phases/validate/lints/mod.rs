//! Built-in lints for the validate phase.

mod binding_conflict;
mod endpoint_bindings;
mod path_variables;
mod required_default;
mod response_rules;
mod server_variables;

pub use binding_conflict::BindingConflictLint;
pub use endpoint_bindings::EndpointBindingsLint;
pub use path_variables::PathVariablesLint;
pub use required_default::RequiredDefaultLint;
pub use response_rules::ResponseRulesLint;
pub use server_variables::ServerVariablesLint;
