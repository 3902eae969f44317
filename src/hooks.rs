//! Reusable Yew hooks.

use cafe_spot::Observable;
use std::rc::Rc;
use yew::prelude::*;

/// Subscribes the calling component to a store for its mounted lifetime
/// and returns a revision counter that bumps on every store notification,
/// forcing a re-render. The subscription is dropped on unmount so a
/// notification can never touch unmounted state.
#[hook]
pub fn use_revision<S>(store: Rc<S>) -> usize
where
    S: Observable + 'static,
{
    let revision = use_state(|| 0usize);
    let tick = use_mut_ref(|| 0usize);
    {
        let revision = revision.clone();
        use_effect_with((), move |_| {
            let subscription = store.subscribe(Rc::new(move || {
                let next = *tick.borrow() + 1;
                *tick.borrow_mut() = next;
                revision.set(next);
            }));
            move || store.unsubscribe(subscription)
        });
    }
    *revision
}
