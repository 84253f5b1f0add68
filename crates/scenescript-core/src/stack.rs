//! Fixed-capacity LIFO stack.
//!
//! Backed by an [`ArrayVec`], so the storage lives inline and never
//! reallocates. Every operation that could overflow or underflow returns a
//! [`StackError`] instead of panicking, and a failed operation leaves the
//! contents untouched.

use arrayvec::ArrayVec;

use crate::error::StackError;

/// A LIFO stack holding at most `N` elements.
///
/// # Examples
///
/// ```
/// use scenescript_core::Stack;
///
/// let mut stack: Stack<i32, 2> = Stack::new();
/// stack.push(1).unwrap();
/// stack.push(2).unwrap();
/// assert!(stack.push(3).is_err());
/// assert_eq!(stack.top(), Ok(&2));
/// assert_eq!(stack.next(), Ok(&1));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Stack<T, const N: usize> {
    items: ArrayVec<T, N>,
}

impl<T, const N: usize> Stack<T, N> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            items: ArrayVec::new(),
        }
    }

    /// Push an element. Fails without modifying the stack when full.
    pub fn push(&mut self, value: T) -> Result<(), StackError> {
        self.items
            .try_push(value)
            .map_err(|_| StackError::Overflow { capacity: N })
    }

    /// Remove and return the topmost element.
    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Underflow)
    }

    /// The topmost element.
    pub fn top(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Underflow)
    }

    /// The element `depth` positions below the top (0 is the topmost).
    pub fn top_n(&self, depth: usize) -> Result<&T, StackError> {
        let count = self.items.len();
        if depth >= count {
            return Err(if count == 0 {
                StackError::Underflow
            } else {
                StackError::OutOfRange { depth, count }
            });
        }
        Ok(&self.items[count - 1 - depth])
    }

    /// The element directly below the top.
    pub fn next(&self) -> Result<&T, StackError> {
        self.top_n(1)
    }

    /// Remove the topmost `n` elements, yielding them bottom to top.
    ///
    /// Fails without modifying the stack if fewer than `n` elements exist.
    pub fn pop_n(&mut self, n: usize) -> Result<arrayvec::Drain<'_, T, N>, StackError> {
        let count = self.items.len();
        if n > count {
            return Err(StackError::Underflow);
        }
        Ok(self.items.drain(count - n..))
    }

    /// Number of elements on the stack.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    pub fn empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Maximum number of elements.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T, const N: usize> Default for Stack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
