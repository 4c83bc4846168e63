//! Macros for ergonomic machine construction.

/// Build a `Vec<Transit>` from `"action": "prev" => "next"` rows.
///
/// Leave the previous state out (`"boot": => "idle"`) for a transition
/// from `"none"`.
///
/// # Example
///
/// ```
/// use transit::transits;
///
/// let rows = transits! {
///     "boot": => "idle",
///     "start": "idle" => "running",
///     "stop": "running" => "idle",
/// };
///
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].prev, None);
/// assert_eq!(rows[1].prev.as_deref(), Some("idle"));
/// ```
#[macro_export]
macro_rules! transits {
    (@prev) => {
        None
    };
    (@prev $prev:literal) => {
        Some($prev)
    };
    (
        $(
            $action:literal : $($prev:literal)? => $next:literal
        ),* $(,)?
    ) => {
        vec![
            $(
                $crate::config::Transit::new(
                    $action,
                    $crate::transits!(@prev $($prev)?),
                    $next,
                )
            ),*
        ]
    };
}

#[cfg(test)]
mod tests {
    use crate::config::Transit;

    #[test]
    fn transits_macro_expands_rows() {
        let rows = transits! {
            "start": "idle" => "running",
            "stop": "running" => "idle"
        };

        assert_eq!(
            rows,
            vec![
                Transit::new("start", Some("idle"), "running"),
                Transit::new("stop", Some("running"), "idle"),
            ]
        );
    }

    #[test]
    fn transits_macro_defaults_prev_to_none() {
        let rows = transits! { "boot": => "idle" };

        assert_eq!(rows, vec![Transit::new("boot", None, "idle")]);
    }

    #[test]
    fn transits_macro_accepts_empty_input() {
        let rows: Vec<Transit> = transits! {};

        assert!(rows.is_empty());
    }
}
