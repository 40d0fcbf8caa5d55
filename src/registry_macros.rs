/// Builds a [`crate::Registry`] from `capability => implementation` pairs.
///
/// Each entry expands to a [`crate::RegistryBuilder::bind`] call with the
/// coercion closure generated for the pair.
///
/// ```
/// use wirebox::{registry, Container, Injectable, InstantiateErrorKind};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> &'static str;
/// }
///
/// struct EnglishGreeter;
///
/// impl Greeter for EnglishGreeter {
///     fn greet(&self) -> &'static str {
///         "hello"
///     }
/// }
///
/// impl Injectable for EnglishGreeter {
///     fn construct() -> Result<Self, InstantiateErrorKind> {
///         Ok(Self)
///     }
/// }
///
/// let container = Container::new(registry! {
///     dyn Greeter => EnglishGreeter,
/// });
/// let greeter = container.resolve::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
#[macro_export]
macro_rules! registry {
    ( $( $cap:ty => $impl:ty ),* $(,)? ) => {{
        $crate::RegistryBuilder::new()
            $(
                .bind(
                    |implementation: $crate::macros_utils::Arc<$impl>| -> $crate::macros_utils::Arc<$cap> {
                        implementation
                    },
                )
            )*
            .build()
    }};
}
