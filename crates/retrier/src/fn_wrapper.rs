// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Generates a named, clonable wrapper around a shared `Fn` trait object.
///
/// Policies store user-provided hooks behind an `Arc<dyn Fn ... + Send + Sync>` so that a
/// single policy can be cloned cheaply and shared across threads.
///
/// ```rust,ignore
/// define_fn_wrapper!(Checker(Fn(error: &ChainError) -> bool));
/// define_fn_wrapper!(AfterRetryLimit(Fn(error: &ChainError)));
/// ```
///
/// Each generated type has a `new` constructor, a `call` method that invokes the function,
/// and `Clone` and `Debug` implementations. `Debug` prints only the type name.
macro_rules! define_fn_wrapper {
    ($name:ident(Fn($($param_name:ident: $param_ty:ty),*) -> $return_ty:ty)) => {
        pub(crate) struct $name(std::sync::Arc<dyn Fn($($param_ty),*) -> $return_ty + Send + Sync>);

        impl $name {
            pub(crate) fn new<F>(function: F) -> Self
            where
                F: Fn($($param_ty),*) -> $return_ty + Send + Sync + 'static,
            {
                Self(std::sync::Arc::new(function))
            }

            pub(crate) fn call(&self, $($param_name: $param_ty),*) -> $return_ty {
                (self.0)($($param_name),*)
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                Self(std::sync::Arc::clone(&self.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish()
            }
        }
    };

    ($name:ident(Fn($($param_name:ident: $param_ty:ty),*))) => {
        $crate::fn_wrapper::define_fn_wrapper!($name(Fn($($param_name: $param_ty),*) -> ()));
    };
}

pub(crate) use define_fn_wrapper;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    define_fn_wrapper!(Measure(Fn(text: &str) -> usize));
    define_fn_wrapper!(Observe(Fn(value: usize)));

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(Measure: Send, Sync, Debug, Clone);
    }

    #[test]
    fn call_ok() {
        let wrapper = Measure::new(str::len);
        assert_eq!(wrapper.call("hello"), 5);

        let cloned = wrapper.clone();
        assert_eq!(cloned.call("hi"), 2);
    }

    #[test]
    fn unit_return() {
        let seen = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&seen);
        let wrapper = Observe::new(move |value| observed.store(value, Ordering::Relaxed));

        wrapper.call(7);
        assert_eq!(seen.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn debug_ok() {
        assert_eq!(format!("{:?}", Measure::new(str::len)), "Measure");
    }
}
