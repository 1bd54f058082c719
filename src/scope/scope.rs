use std::collections::HashMap;

use crate::{ast::types::Type, errors::fault::Fault};

/// Handle of a frame inside a [`Scope`].
pub type FrameId = usize;

/// Names one particular frame. Stays valid only while that frame is on the
/// stack; a popped slot reused by a later push gets a new serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    id: FrameId,
    serial: u64,
}

/// What kind of construct a frame was pushed for.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    Function { return_type: Type },
}

#[derive(Debug)]
pub struct Frame<V> {
    values: HashMap<String, V>,
    context: Option<Context>,
    parent: Option<FrameId>,
    serial: u64,
}

impl<V> Frame<V> {
    fn new(context: Option<Context>, parent: Option<FrameId>, serial: u64) -> Self {
        Frame {
            values: HashMap::new(),
            context,
            parent,
            serial,
        }
    }
}

/// Frames live in an arena and point at their parent by index. Frames are
/// pushed and popped in strict stack order; the global frame is never
/// popped.
#[derive(Debug)]
pub struct Scope<V> {
    frames: Vec<Frame<V>>,
    pushed: u64,
}

impl<V: Clone> Scope<V> {
    pub fn new(globals: impl IntoIterator<Item = (String, V)>) -> Self {
        let mut global = Frame::new(None, None, 0);
        global.values.extend(globals);

        Scope {
            frames: vec![global],
            pushed: 0,
        }
    }

    pub fn global(&self) -> FrameId {
        0
    }

    pub fn current(&self) -> FrameId {
        self.frames.len() - 1
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, parent: FrameId, context: Option<Context>) -> FrameId {
        self.pushed += 1;
        self.frames
            .push(Frame::new(context, Some(parent), self.pushed));
        self.current()
    }

    pub fn handle(&self, id: FrameId) -> FrameHandle {
        FrameHandle {
            id,
            serial: self.frames[id].serial,
        }
    }

    /// The frame `handle` names, or `None` once it has been popped.
    pub fn resolve(&self, handle: FrameHandle) -> Option<FrameId> {
        self.frames
            .get(handle.id)
            .filter(|frame| frame.serial == handle.serial)
            .map(|_| handle.id)
    }

    pub fn pop(&mut self) -> Result<(), Fault> {
        if self.frames.len() <= 1 {
            return Err(Fault::PopGlobalScope);
        }

        self.frames.pop();
        Ok(())
    }

    /// Context of the nearest enclosing frame that has one.
    pub fn context(&self) -> Option<&Context> {
        let mut frame = Some(self.current());

        while let Some(id) = frame {
            if let Some(context) = &self.frames[id].context {
                return Some(context);
            }
            frame = self.frames[id].parent;
        }

        None
    }

    fn find(&self, ident: &str) -> Option<FrameId> {
        let mut frame = Some(self.current());

        while let Some(id) = frame {
            if self.frames[id].values.contains_key(ident) {
                return Some(id);
            }
            frame = self.frames[id].parent;
        }

        None
    }

    pub fn get(&self, ident: &str) -> Option<V> {
        self.get_ref(ident).cloned()
    }

    pub fn get_ref(&self, ident: &str) -> Option<&V> {
        self.find(ident)
            .and_then(|id| self.frames[id].values.get(ident))
    }

    /// Looks only at the innermost frame.
    pub fn get_local(&self, ident: &str) -> Option<V> {
        self.frames[self.current()].values.get(ident).cloned()
    }

    /// Binds into the innermost frame, replacing any binding already there.
    pub fn insert(&mut self, ident: impl Into<String>, value: V) {
        let current = self.current();
        self.frames[current].values.insert(ident.into(), value);
    }

    /// Rebinds `ident` in the nearest frame that holds it. Returns false and
    /// changes nothing when it is unbound.
    pub fn update(&mut self, ident: &str, value: V) -> bool {
        match self.find(ident) {
            Some(id) => {
                self.frames[id].values.insert(String::from(ident), value);
                true
            }
            None => false,
        }
    }
}
