/// Builds a [`Fields`](crate::Fields) map for the `*_with` facade methods.
///
/// Values may be anything serializable; one that refuses to serialize is
/// coerced to its error text so the surrounding event still goes out.
///
/// ```
/// use sidecar_logging::fields;
///
/// let attachments = fields! { "port" => 8000, "reload" => false };
/// assert_eq!(attachments.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Fields::new();
        $(
            map.insert($key.to_string(), $crate::context::field_value(&$value));
        )+
        map
    }};
}
