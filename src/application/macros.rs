//! Use case declaration macro
//!
//! Every use case is a struct holding one repository and exposing a single
//! `execute` that forwards to one repository method:
//!
//! ```ignore
//! use_case! {
//!     /// Fetch one business
//!     GetBusiness(BusinessRepository) => get_business(id: &BusinessId) -> Business
//! }
//! ```

macro_rules! use_case {
    ($(
        $(#[$meta:meta])*
        $name:ident($repository:ident) => $method:ident($($arg:ident: $ty:ty),* $(,)?) -> $output:ty
    );+ $(;)?) => {
        $(
            $(#[$meta])*
            pub struct $name {
                repository: ::std::sync::Arc<dyn $repository>,
            }

            impl $name {
                pub fn new(repository: ::std::sync::Arc<dyn $repository>) -> Self {
                    Self { repository }
                }

                pub async fn execute(&self, $($arg: $ty),*) -> $crate::domain::shared::Result<$output> {
                    self.repository.$method($($arg),*).await
                }
            }
        )+
    };
}

pub(crate) use use_case;
