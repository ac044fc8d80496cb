/// Stack space that must remain before recursing further.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the stack first when less than [`RED_ZONE`] is left.
///
/// Wraps every recursive descent over expressions so deeply nested input
/// cannot overflow the host stack.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
