//! Type-erased storage for node values

use std::any::Any;

/// Object-safe view of a value stored in the computation graph.
///
/// Nodes of different value types share one store, so values are kept behind
/// this trait and recovered by downcast at the typed API boundary. A blanket
/// implementation covers every `T: Clone + PartialEq + 'static`; user code
/// never implements the trait directly.
pub trait NodeValue: Any {
    /// Clone the value into a fresh box.
    fn boxed_clone(&self) -> Box<dyn NodeValue>;

    /// Compare against another erased value.
    ///
    /// Values of different concrete types are never equal.
    fn value_eq(&self, other: &dyn NodeValue) -> bool;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl<T> NodeValue for T
where
    T: Clone + PartialEq + 'static,
{
    fn boxed_clone(&self) -> Box<dyn NodeValue> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn NodeValue) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Recover the concrete type of an erased value.
///
/// Panics on a type mismatch. The typed [`Anchor`](crate::Anchor) handles
/// make a mismatch unreachable from the public API, so this is an internal
/// invariant check rather than a user-facing error path.
pub(crate) fn downcast<T: 'static>(value: &dyn NodeValue) -> &T {
    match value.as_any().downcast_ref::<T>() {
        Some(value) => value,
        None => panic!(
            "node holds a different value type than the anchor it was read through"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_eq_same_type_same_value() {
        let a: Box<dyn NodeValue> = Box::new(42);
        let b: Box<dyn NodeValue> = Box::new(42);

        assert!(a.value_eq(b.as_ref()));
    }

    #[test]
    fn test_value_eq_same_type_different_value() {
        let a: Box<dyn NodeValue> = Box::new(42);
        let b: Box<dyn NodeValue> = Box::new(43);

        assert!(!a.value_eq(b.as_ref()));
    }

    #[test]
    fn test_value_eq_different_types() {
        // Same bit pattern, different concrete types
        let a: Box<dyn NodeValue> = Box::new(42i32);
        let b: Box<dyn NodeValue> = Box::new(42i64);

        assert!(!a.value_eq(b.as_ref()));
    }

    #[test]
    fn test_boxed_clone_preserves_value() {
        let a: Box<dyn NodeValue> = Box::new(String::from("hello"));
        let b = a.boxed_clone();

        assert!(a.value_eq(b.as_ref()));
        assert_eq!(downcast::<String>(b.as_ref()), "hello");
    }

    #[test]
    fn test_downcast_recovers_concrete_type() {
        let a: Box<dyn NodeValue> = Box::new(vec![1, 2, 3]);

        assert_eq!(downcast::<Vec<i32>>(a.as_ref()), &vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "different value type")]
    fn test_downcast_wrong_type_panics() {
        let a: Box<dyn NodeValue> = Box::new(42i32);

        downcast::<String>(a.as_ref());
    }
}
