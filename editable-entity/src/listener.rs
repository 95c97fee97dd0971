use editable_types::EntityRef;
use std::fmt;

/// Notification sink for successful lifecycle operations.
///
/// Every method defaults to a no-op; implement only what you need.
/// Callbacks run outside the entity's internal lock.
pub trait EntityListener: Send + Sync {
    /// A new resource was created. Fired after `on_save`.
    fn on_create(&self, entity: &EntityRef) {
        let _ = entity;
    }

    /// A create or update returned the resource identity.
    fn on_save(&self, entity: &EntityRef) {
        let _ = entity;
    }

    /// The resource was deleted.
    fn on_remove(&self, entity: &EntityRef) {
        let _ = entity;
    }
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl EntityListener for NoopListener {}

type Callback = Box<dyn Fn(&EntityRef) + Send + Sync>;

/// Closure-based listener.
///
/// ```
/// use editable_entity::Callbacks;
///
/// let callbacks = Callbacks::new().on_save(|entity| println!("saved {entity}"));
/// ```
#[derive(Default)]
pub struct Callbacks {
    on_create: Option<Callback>,
    on_save: Option<Callback>,
    on_remove: Option<Callback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(mut self, f: impl Fn(&EntityRef) + Send + Sync + 'static) -> Self {
        self.on_create = Some(Box::new(f));
        self
    }

    pub fn on_save(mut self, f: impl Fn(&EntityRef) + Send + Sync + 'static) -> Self {
        self.on_save = Some(Box::new(f));
        self
    }

    pub fn on_remove(mut self, f: impl Fn(&EntityRef) + Send + Sync + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_create", &self.on_create.is_some())
            .field("on_save", &self.on_save.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}

impl EntityListener for Callbacks {
    fn on_create(&self, entity: &EntityRef) {
        if let Some(f) = &self.on_create {
            f(entity);
        }
    }

    fn on_save(&self, entity: &EntityRef) {
        if let Some(f) = &self.on_save {
            f(entity);
        }
    }

    fn on_remove(&self, entity: &EntityRef) {
        if let Some(f) = &self.on_remove {
            f(entity);
        }
    }
}
