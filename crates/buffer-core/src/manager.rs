//! Registry of open buffers with one active buffer.
//!
//! [`BufferManager`] is the sole owner of every buffer it registers. Callers receive
//! [`BufferRef`] handles, which hold only a weak reference: once the entry is closed, every access
//! through an old handle returns `None`.
//!
//! Registry reads take a shared lock and structural changes an exclusive one, held only for the
//! registry change itself. Editing a buffer through a handle locks that buffer alone.
//!
//! The registry lock is never held while a buffer lock is taken. Methods that look inside buffers
//! ([`BufferManager::open`], [`BufferManager::has_unsaved`], [`BufferManager::unsaved_buffers`])
//! first copy the registry entries, release the registry, and then lock each buffer in turn. They
//! still lock every registered buffer, so calling them from inside a [`BufferRef::write`] closure
//! on a buffer of the same manager blocks forever.
//!
//! # Example
//!
//! ```rust
//! use buffer_core::{BufferManager, Position};
//!
//! let manager = BufferManager::new();
//! let scratch = manager.create(None);
//! scratch.write(|buffer| buffer.insert(Position::origin(), "draft")).unwrap().unwrap();
//!
//! assert_eq!(manager.count(), 1);
//! assert!(manager.has_unsaved());
//! assert_eq!(manager.active_id().unwrap().as_str(), "buffer-1");
//! ```

use std::path::Path;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use crate::buffer::{Buffer, BufferId};
use crate::error::ManagerError;

type SharedBuffer = Arc<RwLock<Buffer>>;

/// Borrowed handle to a buffer owned by a [`BufferManager`].
#[derive(Debug, Clone)]
pub struct BufferRef {
    id: BufferId,
    buffer: Weak<RwLock<Buffer>>,
}

impl BufferRef {
    fn new(id: BufferId, buffer: &SharedBuffer) -> Self {
        Self {
            id,
            buffer: Arc::downgrade(buffer),
        }
    }

    /// Id of the referenced buffer.
    pub fn id(&self) -> &BufferId {
        &self.id
    }

    /// Whether the buffer is still registered.
    pub fn is_alive(&self) -> bool {
        self.buffer.strong_count() > 0
    }

    /// Run `f` with shared access to the buffer, or return `None` if it was closed.
    pub fn read<R>(&self, f: impl FnOnce(&Buffer) -> R) -> Option<R> {
        let buffer = self.buffer.upgrade()?;
        let guard = buffer.read();
        Some(f(&guard))
    }

    /// Run `f` with exclusive access to the buffer, or return `None` if it was closed.
    pub fn write<R>(&self, f: impl FnOnce(&mut Buffer) -> R) -> Option<R> {
        let buffer = self.buffer.upgrade()?;
        let mut guard = buffer.write();
        Some(f(&mut guard))
    }

    /// Whether both handles point at the same buffer instance.
    pub fn same_buffer(&self, other: &BufferRef) -> bool {
        Weak::ptr_eq(&self.buffer, &other.buffer)
    }
}

#[derive(Debug, Default)]
struct Registry {
    buffers: IndexMap<BufferId, SharedBuffer>,
    active: Option<BufferId>,
    next_id: u64,
}

impl Registry {
    fn generate_id(&mut self) -> BufferId {
        loop {
            self.next_id += 1;
            let id = BufferId::new(format!("buffer-{}", self.next_id));
            if !self.buffers.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, buffer: Buffer) -> BufferRef {
        let id = buffer.id().clone();
        let shared = Arc::new(RwLock::new(buffer));
        let handle = BufferRef::new(id.clone(), &shared);
        self.buffers.insert(id.clone(), shared);
        self.active = Some(id);
        handle
    }

    fn handle(&self, id: &BufferId) -> Option<BufferRef> {
        self.buffers
            .get(id)
            .map(|buffer| BufferRef::new(id.clone(), buffer))
    }

    fn active_index(&self) -> Option<usize> {
        self.active
            .as_ref()
            .and_then(|id| self.buffers.get_index_of(id))
    }

    fn entries(&self) -> Vec<(BufferId, SharedBuffer)> {
        self.buffers
            .iter()
            .map(|(id, buffer)| (id.clone(), Arc::clone(buffer)))
            .collect()
    }

    fn holds(&self, id: &BufferId, buffer: &SharedBuffer) -> bool {
        self.buffers
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, buffer))
    }
}

/// Thread-safe registry of buffers with one active buffer.
#[derive(Debug, Default)]
pub struct BufferManager {
    registry: RwLock<Registry>,
    // Serializes `open` so two callers cannot load the same path twice.
    opening: Mutex<()>,
}

impl BufferManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new empty buffer and make it active.
    ///
    /// With `None` an id of the form `buffer-N` is generated. An existing buffer with the same id
    /// is replaced.
    pub fn create(&self, id: Option<BufferId>) -> BufferRef {
        let mut registry = self.registry.write();
        let id = id.unwrap_or_else(|| registry.generate_id());
        tracing::debug!(buffer = %id, "create buffer");
        registry.insert(Buffer::new(id))
    }

    /// Open `path` in a new clean buffer and make it active.
    ///
    /// If a buffer already holds `path` it is activated and returned without reloading. The file
    /// is read without holding the registry lock.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<BufferRef, ManagerError> {
        let path = path.as_ref();
        let _opening = self.opening.lock();

        let entries = self.registry.read().entries();
        let existing = entries
            .iter()
            .find(|(_, buffer)| buffer.read().path() == Some(path));
        if let Some((id, buffer)) = existing {
            let mut registry = self.registry.write();
            // The buffer may have been closed since the entries were copied.
            if registry.holds(id, buffer) {
                tracing::debug!(buffer = %id, path = %path.display(), "buffer already open");
                registry.active = Some(id.clone());
                return Ok(BufferRef::new(id.clone(), buffer));
            }
        }
        drop(entries);

        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to read file");
            ManagerError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut buffer = Buffer::from_content(path.to_string_lossy().into_owned(), &content);
        buffer.set_path(path);

        let mut registry = self.registry.write();
        let id = registry.generate_id();
        buffer.rename(id.clone());
        tracing::debug!(buffer = %id, path = %path.display(), lines = buffer.line_count(), "open buffer");
        Ok(registry.insert(buffer))
    }

    /// Remove a buffer. Returns `false` if `id` is not registered.
    ///
    /// Closing the active buffer activates the buffer that takes its slot (or the new last one),
    /// or nothing once the registry is empty.
    pub fn close(&self, id: &BufferId) -> bool {
        let mut registry = self.registry.write();
        let Some(index) = registry.buffers.get_index_of(id) else {
            return false;
        };
        registry.buffers.shift_remove_index(index);

        if registry.active.as_ref() == Some(id) {
            let fallback = index.min(registry.buffers.len().saturating_sub(1));
            registry.active = registry
                .buffers
                .get_index(fallback)
                .map(|(next, _)| next.clone());
        }

        tracing::debug!(buffer = %id, active = ?registry.active, "close buffer");
        true
    }

    /// Handle to the buffer registered under `id`.
    pub fn get(&self, id: &BufferId) -> Option<BufferRef> {
        self.registry.read().handle(id)
    }

    /// Handle to the active buffer.
    pub fn active(&self) -> Option<BufferRef> {
        let registry = self.registry.read();
        registry.active.as_ref().and_then(|id| registry.handle(id))
    }

    /// Id of the active buffer.
    pub fn active_id(&self) -> Option<BufferId> {
        self.registry.read().active.clone()
    }

    /// Make `id` the active buffer. Returns `false` if it is not registered.
    pub fn switch_to(&self, id: &BufferId) -> bool {
        let mut registry = self.registry.write();
        if !registry.buffers.contains_key(id) {
            return false;
        }
        registry.active = Some(id.clone());
        true
    }

    /// Handles to every buffer, in registration order.
    pub fn all(&self) -> Vec<BufferRef> {
        let registry = self.registry.read();
        registry
            .buffers
            .iter()
            .map(|(id, buffer)| BufferRef::new(id.clone(), buffer))
            .collect()
    }

    /// Ids of every buffer, in registration order.
    pub fn all_ids(&self) -> Vec<BufferId> {
        self.registry.read().buffers.keys().cloned().collect()
    }

    /// Number of registered buffers.
    pub fn count(&self) -> usize {
        self.registry.read().buffers.len()
    }

    /// Whether any buffer is dirty.
    pub fn has_unsaved(&self) -> bool {
        let entries = self.registry.read().entries();
        entries.iter().any(|(_, buffer)| buffer.read().is_dirty())
    }

    /// Handles to every dirty buffer.
    pub fn unsaved_buffers(&self) -> Vec<BufferRef> {
        let entries = self.registry.read().entries();
        entries
            .iter()
            .filter(|(_, buffer)| buffer.read().is_dirty())
            .map(|(id, buffer)| BufferRef::new(id.clone(), buffer))
            .collect()
    }

    /// Remove every buffer and clear the active pointer.
    pub fn close_all(&self) {
        let mut registry = self.registry.write();
        tracing::debug!(count = registry.buffers.len(), "close all buffers");
        registry.buffers.clear();
        registry.active = None;
    }

    /// Activate the next buffer, wrapping around. Returns `false` only when there are no buffers.
    pub fn next(&self) -> bool {
        self.cycle(|index, len| index.map_or(0, |i| (i + 1) % len))
    }

    /// Activate the previous buffer, wrapping around. Returns `false` only when there are no
    /// buffers.
    pub fn previous(&self) -> bool {
        self.cycle(|index, len| match index {
            None => 0,
            Some(0) => len - 1,
            Some(i) => i - 1,
        })
    }

    fn cycle(&self, step: impl FnOnce(Option<usize>, usize) -> usize) -> bool {
        let mut registry = self.registry.write();
        let len = registry.buffers.len();
        if len == 0 {
            return false;
        }
        let target = step(registry.active_index(), len);
        registry.active = registry.buffers.get_index(target).map(|(id, _)| id.clone());
        true
    }
}
