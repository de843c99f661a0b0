// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the job and audience models.
//!
//! - [`simple_display!`]: `Display` for enums whose variants print as fixed words
//! - [`setters!`]: chained `with`-style setters for parameter structs
//! - [`builder!`]: test-only builder with defaults, built on [`setters!`]

/// `Display` for an enum whose variants each print as a fixed word.
///
/// Variants carrying data take `(..)` after the name.
///
/// ```ignore
/// crate::simple_display! {
///     Relationship {
///         And => "AND",
///         Or => "OR",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $word:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let word = match self {
                    $( Self::$variant $(( $($ignore)* ))? => $word, )+
                };
                f.write_str(word)
            }
        }
    };
}

/// Chained setters, expanded inside an existing `impl` block.
///
/// `into` fields accept `impl Into<T>`, `set` fields take `T` as is, and
/// `option` fields wrap the value in `Some`.
///
/// ```ignore
/// impl AudienceCreateParams {
///     aj_core::setters! {
///         into { description: String }
///         set { lifespan: u32, shared: bool }
///         option { rules: RuleGroup }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into { $( $into_field:ident : $into_ty:ty ),* $(,)? })?
        $(set { $( $set_field:ident : $set_ty:ty ),* $(,)? })?
        $(option { $( $opt_field:ident : $opt_ty:ty ),* $(,)? })?
    ) => {
        $($(
            pub fn $into_field(mut self, value: impl Into<$into_ty>) -> Self {
                self.$into_field = value.into();
                self
            }
        )*)?
        $($(
            pub fn $set_field(mut self, value: $set_ty) -> Self {
                self.$set_field = value;
                self
            }
        )*)?
        $($(
            pub fn $opt_field(mut self, value: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(value.into());
                self
            }
        )*)?
    };
}

/// Test builder for a struct whose fields are all listed with defaults.
///
/// Everything generated is gated on `test` or the `test-support` feature,
/// so production code can only reach private fields through the real
/// constructors.
///
/// ```ignore
/// crate::builder! {
///     pub struct JobBuilder => Job {
///         into { error: String = "" }
///         set { id: i64 = 1, status: JobStatus = JobStatus::Pending }
///     }
/// }
/// ```
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            $(into { $( $into_field:ident : $into_ty:ty = $into_default:expr ),* $(,)? })?
            $(set { $( $set_field:ident : $set_ty:ty = $set_default:expr ),* $(,)? })?
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $($( $into_field: $into_ty, )*)?
            $($( $set_field: $set_ty, )*)?
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $($( $into_field: $into_default.into(), )*)?
                    $($( $set_field: $set_default, )*)?
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $crate::setters! {
                $(into { $( $into_field: $into_ty ),* })?
                $(set { $( $set_field: $set_ty ),* })?
            }

            pub fn build(self) -> $target {
                $target {
                    $($( $into_field: self.$into_field, )*)?
                    $($( $set_field: self.$set_field, )*)?
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}
