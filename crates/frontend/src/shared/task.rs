use std::rc::Rc;

use futures::future::LocalBoxFuture;

/// Runs fire-and-forget completions on the UI thread
#[derive(Clone)]
pub struct Spawner(Rc<dyn Fn(LocalBoxFuture<'static, ()>)>);

impl Spawner {
    pub fn new(spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        Self(Rc::new(spawn))
    }

    /// Browser event loop via `leptos::task::spawn_local`
    pub fn local() -> Self {
        Self::new(|fut| leptos::task::spawn_local(fut))
    }

    pub fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        (self.0)(fut)
    }
}
