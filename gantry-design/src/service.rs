//! Services and methods.

use crate::types::Attribute;

/// A service groups related methods.
#[derive(Debug, Clone)]
pub struct Service {
    /// Service name as declared.
    pub name: String,
    /// Description used for generated comments.
    pub description: Option<String>,
    /// Methods in declaration order.
    pub methods: Vec<Method>,
}

impl Service {
    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A service method with optional payload and result.
#[derive(Debug, Clone)]
pub struct Method {
    /// Method name as declared.
    pub name: String,
    /// Description used for generated comments.
    pub description: Option<String>,
    /// Method payload. `None` means the method takes no input.
    pub payload: Option<Attribute>,
    /// Method result. `None` means the method returns no data.
    pub result: Option<Attribute>,
}

impl Method {
    /// Returns true if the method takes a payload.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}
