//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Strict integer lookup: `None` when missing, `Some(Err(raw))` when the
    /// value is present but not an integer.
    fn get_int_opt(&self, section: &str, key: &str) -> Option<Result<i64, String>>;
}
