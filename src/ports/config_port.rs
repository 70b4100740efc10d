//! Configuration access port.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// All `key = value` pairs of a section, sorted by key. Keys without a
    /// value are omitted.
    fn entries(&self, section: &str) -> Vec<(String, String)>;
}
