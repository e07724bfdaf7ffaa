use indexmap::IndexMap;
use tracing::trace;

/// Pool of named helper functions. A helper is generated the first time its
/// name is requested and shared by every later caller, so each one appears
/// once in the output no matter how many call sites need it.
#[derive(Debug, Default)]
pub struct FunctionCollector {
    functions: IndexMap<String, String>,
}

impl FunctionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `creator` only if `name` is not registered yet. Returns `name`.
    pub fn create_function<F>(&mut self, name: &str, creator: F) -> String
    where
        F: FnOnce() -> String,
    {
        if !self.functions.contains_key(name) {
            trace!(function = name, "registering utility function");
            let code = creator();
            self.functions.insert(name.to_string(), code);
        }
        name.to_string()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Code of every registered function, ordered by name, and empties the pool.
    pub fn requested_functions(&mut self) -> String {
        let mut functions: Vec<(String, String)> = self.functions.drain(..).collect();
        functions.sort_by(|a, b| a.0.cmp(&b.0));
        functions.into_iter().map(|(_, code)| code).collect()
    }
}
