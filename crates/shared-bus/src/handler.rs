//! # Event Handlers
//!
//! Type-erased, arity-tagged callbacks registered on a channel.
//!
//! A `Handler` is a cheap, clonable reference to one callback. Clones share
//! identity: subscribing a clone and unsubscribing the original removes the
//! same registration. Two handlers built from identical closures are
//! different handlers.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

type Nullary = Box<dyn Fn() + Send + Sync>;
type Unary<A> = Box<dyn Fn(&A) + Send + Sync>;
type Binary<A, B> = Box<dyn Fn(&A, &B) + Send + Sync>;

/// One positional argument type of a signature.
#[derive(Debug, Clone, Copy)]
pub struct ArgType {
    id: TypeId,
    name: &'static str,
}

impl ArgType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ArgType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgType {}

/// Arity and argument types shared by every handler of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Nullary,
    Unary(ArgType),
    Binary(ArgType, ArgType),
}

impl Signature {
    pub fn unary<A: 'static>() -> Self {
        Signature::Unary(ArgType::of::<A>())
    }

    pub fn binary<A: 'static, B: 'static>() -> Self {
        Signature::Binary(ArgType::of::<A>(), ArgType::of::<B>())
    }

    pub fn arity(&self) -> usize {
        match self {
            Signature::Nullary => 0,
            Signature::Unary(_) => 1,
            Signature::Binary(_, _) => 2,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Nullary => write!(f, "()"),
            Signature::Unary(a) => write!(f, "({})", a.name),
            Signature::Binary(a, b) => write!(f, "({}, {})", a.name, b.name),
        }
    }
}

/// A callback registered on an `EventBus` channel.
#[derive(Clone)]
pub struct Handler {
    signature: Signature,
    callback: Arc<dyn Any + Send + Sync>,
}

impl Handler {
    /// Handler for channels triggered without arguments.
    pub fn nullary<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let callback: Nullary = Box::new(f);
        Self {
            signature: Signature::Nullary,
            callback: Arc::new(callback),
        }
    }

    /// Handler for channels triggered with one argument.
    pub fn unary<A, F>(f: F) -> Self
    where
        A: 'static,
        F: Fn(&A) + Send + Sync + 'static,
    {
        let callback: Unary<A> = Box::new(f);
        Self {
            signature: Signature::unary::<A>(),
            callback: Arc::new(callback),
        }
    }

    /// Handler for channels triggered with two arguments.
    pub fn binary<A, B, F>(f: F) -> Self
    where
        A: 'static,
        B: 'static,
        F: Fn(&A, &B) + Send + Sync + 'static,
    {
        let callback: Binary<A, B> = Box::new(f);
        Self {
            signature: Signature::binary::<A, B>(),
            callback: Arc::new(callback),
        }
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Identity comparison: true only for clones of the same handler.
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    /// Returns `false` when the stored callback is not nullary.
    pub(crate) fn invoke0(&self) -> bool {
        match self.callback.downcast_ref::<Nullary>() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    pub(crate) fn invoke1<A: 'static>(&self, a: &A) -> bool {
        match self.callback.downcast_ref::<Unary<A>>() {
            Some(f) => {
                f(a);
                true
            }
            None => false,
        }
    }

    pub(crate) fn invoke2<A: 'static, B: 'static>(&self, a: &A, b: &B) -> bool {
        match self.callback.downcast_ref::<Binary<A, B>>() {
            Some(f) => {
                f(a, b);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("signature", &self.signature)
            .field("callback", &Arc::as_ptr(&self.callback))
            .finish()
    }
}
