/// Scaled portion variants added by [`Catalog::with_portions`](super::Catalog::with_portions).
///
/// Each entry is `(factor, name prefix)`; nutrients and cost scale linearly.
pub const PORTION_VARIANTS: [(f64, &str); 5] = [
    (0.3, "One third portion of "),
    (0.5, "Half portion of "),
    (0.7, "Two thirds portion of "),
    (1.5, "Portion and a half of "),
    (2.0, "Double portion of "),
];
