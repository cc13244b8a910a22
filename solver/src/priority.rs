use model::TrainType;

/// Priority computation (§4.5): base 50, plus a fixed boost for train
/// kind, minus accrued delay so a repeatedly delayed train is
/// deprioritized for further delay. The original stub always returns
/// 50 (SPEC_FULL.md §4.5) — this is the richer model the contract
/// calls for.
pub fn priority(kind: TrainType, accrued_delay_minutes: f64) -> f64 {
    (50.0 + kind.priority_boost() - accrued_delay_minutes * 0.5).max(0.0)
}

/// Deterministic tie-break: lower-priority train loses; ties broken by
/// lexicographic train id (§4.5, §9 "Determinism").
pub fn lower_priority<'a>(
    train1: (&'a str, f64),
    train2: (&'a str, f64),
) -> &'a str {
    if train1.1 < train2.1 {
        train1.0
    } else if train2.1 < train1.1 {
        train2.0
    } else if train1.0 <= train2.0 {
        train1.0
    } else {
        train2.0
    }
}
