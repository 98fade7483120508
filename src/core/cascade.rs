/// Result of evaluating one fallback tier
///
/// `Declined` means the tier ran but produced nothing usable, so the next
/// tier in line gets a chance. `Failed` means the tier could not run at all
/// (service down, timeout); callers may route that to a different recovery
/// path than a plain decline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Resolved(T),
    Declined,
    Failed(String),
}
