/// Generic result type for component key handling.
///
/// Standardizes how components report key handling back to the owning
/// view: either the key was consumed (with or without an event for the
/// parent to act on), or the parent should try the next handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Key was consumed, no event for parent to handle
  Handled,
  /// Key was consumed, here's an event for parent to process
  Event(T),
  /// Key was not consumed, parent should try next handler
  NotHandled,
}
