/// Builds a [`PsValue`](crate::PsValue) from JSON-like syntax.
///
/// Object keys keep the order they are written in.
///
/// ```rust
/// use serde_pslit::{pslit, PsValue};
///
/// let value = pslit!({
///     "Name": "web01",
///     "Enabled": true,
///     "Tags": ["frontend", "eu"]
/// });
///
/// let keys: Vec<_> = value.as_hashtable().unwrap().keys().cloned().collect();
/// assert_eq!(keys, vec!["Name", "Enabled", "Tags"]);
/// ```
#[macro_export]
macro_rules! pslit {
    (null) => {
        $crate::PsValue::Null
    };

    (true) => {
        $crate::PsValue::Bool(true)
    };

    (false) => {
        $crate::PsValue::Bool(false)
    };

    ([]) => {
        $crate::PsValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::PsValue::Array(vec![$($crate::pslit!($elem)),*])
    };

    ({}) => {
        $crate::PsValue::Hashtable($crate::PsMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::PsMap::new();
        $(
            map.insert($key.to_string(), $crate::pslit!($value));
        )*
        $crate::PsValue::Hashtable(map)
    }};

    // Any other expression goes through serde
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::PsValue::Null)
    }};
}
