/// The response given by an `EventCallback`'s `on_event` method, which can also act as a request to the `EventBus`.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum BusRequest {
    NoActionNeeded,
    Unsubscribe,
    DispatchFailed,
}

/// The end result of the `EventBus`'s `send_event` method, which results in one of the following:
///
/// 1. `NotNeeded`: Nobody is subscribed to the event's destination topic.
/// 2. `Finished`: The event was handled by every callback in the list.
/// 3. `FinishedWithFailures(n)`: Every callback saw the event, but `n` of them reported a failed dispatch.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum EventDispatchResult {
    NotNeeded,
    Finished,
    FinishedWithFailures(u32),
}

impl EventDispatchResult {
    /// Returns true if at least one callback reported a failed dispatch.
    pub fn has_failures(&self) -> bool {
        matches!(self, EventDispatchResult::FinishedWithFailures(_))
    }
}

/// Given a list of callbacks from the `EventBus`, this method runs a closure on every callback in that list.
///
/// Each of those callbacks will return a resulting `BusRequest`, which we act on accordingly before returning a final `EventDispatchResult`.
pub(crate) fn execute_bus_requests<T, F>(
    callbacks: &mut Vec<T>,
    mut function: F,
) -> EventDispatchResult
where
    F: FnMut(&T) -> BusRequest,
{
    let mut idx = 0;
    let mut failures = 0;
    while idx < callbacks.len() {
        match function(&callbacks[idx]) {
            BusRequest::NoActionNeeded => idx += 1,
            BusRequest::Unsubscribe => {
                // swap_remove for O(1) operation, the swapped-in callback is visited next
                callbacks.swap_remove(idx);
            }
            BusRequest::DispatchFailed => {
                failures += 1;
                idx += 1;
            }
        }
    }

    if failures == 0 {
        EventDispatchResult::Finished
    } else {
        EventDispatchResult::FinishedWithFailures(failures)
    }
}
