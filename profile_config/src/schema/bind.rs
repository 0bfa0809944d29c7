//! Traits implemented by profile schemas and their field types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::de::DeserializeOwned;

use super::{FieldDescriptor, FieldKind};
use crate::{ProfileResult, Walker};

/// A type that can occupy a field of a profile.
///
/// Leaf types resolve themselves through [`Walker::leaf`]; composite types
/// (anything implementing [`Profile`]) descend with [`bind_composite`].
/// `#[derive(Profile)]` implements this trait alongside [`Profile`].
pub trait Bind {
    /// Kind interpreted by the resolver for fields of this type.
    fn kind() -> FieldKind;

    /// Fill `self` from the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while resolving `path` or any path
    /// below it.
    fn bind(
        &mut self,
        walker: &mut Walker<'_>,
        path: &str,
        default: Option<&str>,
    ) -> ProfileResult<()>;
}

/// A configuration schema: a struct whose fields are bound in declaration
/// order.
///
/// Usually derived:
///
/// ```
/// use profile_config::{LayeredStore, Profile, bind};
///
/// #[derive(Debug, Default, Profile)]
/// struct DataSource {
///     #[profile(default = "localhost")]
///     host: String,
///     #[profile(default = "5432")]
///     port: u16,
/// }
///
/// let mut source = DataSource::default();
/// bind(&LayeredStore::default(), &mut source).expect("defaults apply");
/// assert_eq!(source.host, "localhost");
/// assert_eq!(source.port, 5432);
/// ```
///
/// Hand-written implementations call [`Walker::field`] once per field:
///
/// ```
/// use profile_config::schema::{Bind, FieldDescriptor, FieldMeta};
/// use profile_config::{Profile, ProfileResult, Walker};
///
/// #[derive(Default)]
/// struct Eureka {
///     zone: String,
/// }
///
/// const ZONE: FieldMeta = FieldMeta::new("Zone").with_default("primary");
///
/// impl Profile for Eureka {
///     fn walk(&mut self, walker: &mut Walker<'_>) -> ProfileResult<()> {
///         walker.field(ZONE, &mut self.zone)
///     }
///
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![FieldDescriptor::new(ZONE, String::kind())]
///     }
/// }
/// ```
pub trait Profile {
    /// Bind every field through `walker`, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error; earlier fields stay populated.
    fn walk(&mut self, walker: &mut Walker<'_>) -> ProfileResult<()>;

    /// Descriptors for every field, skipped ones included.
    fn fields() -> Vec<FieldDescriptor>;
}

/// [`Bind::bind`] for composite field types: walk `slot` with `path` as the
/// new prefix.
///
/// # Errors
///
/// Propagates the first error raised by the nested walk.
pub fn bind_composite<T: Profile>(
    slot: &mut T,
    walker: &mut Walker<'_>,
    path: &str,
) -> ProfileResult<()> {
    walker.nested(path, |nested| slot.walk(nested))
}

macro_rules! leaf_bind {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Bind for $ty {
                fn kind() -> FieldKind {
                    $kind
                }

                fn bind(
                    &mut self,
                    walker: &mut Walker<'_>,
                    path: &str,
                    default: Option<&str>,
                ) -> ProfileResult<()> {
                    walker.leaf(self, path, default)
                }
            }
        )*
    };
}

leaf_bind! {
    bool => FieldKind::Bool,
    String => FieldKind::String,
    u8 => FieldKind::unsigned(u8::BITS),
    u16 => FieldKind::unsigned(u16::BITS),
    u32 => FieldKind::unsigned(u32::BITS),
    u64 => FieldKind::unsigned(u64::BITS),
    usize => FieldKind::unsigned(usize::BITS),
    i8 => FieldKind::signed(i8::BITS),
    i16 => FieldKind::signed(i16::BITS),
    i32 => FieldKind::signed(i32::BITS),
    i64 => FieldKind::signed(i64::BITS),
    isize => FieldKind::signed(isize::BITS),
    f32 => FieldKind::Float { bits: 32 },
    f64 => FieldKind::Float { bits: 64 },
    figment::value::Value => FieldKind::Any,
    serde_json::Value => FieldKind::Any,
}

impl<T> Bind for Vec<T>
where
    T: Bind + DeserializeOwned,
{
    fn kind() -> FieldKind {
        FieldKind::sequence(T::kind())
    }

    fn bind(
        &mut self,
        walker: &mut Walker<'_>,
        path: &str,
        default: Option<&str>,
    ) -> ProfileResult<()> {
        walker.leaf(self, path, default)
    }
}

impl<T> Bind for BTreeMap<String, T>
where
    T: Bind + DeserializeOwned,
{
    fn kind() -> FieldKind {
        FieldKind::mapping(T::kind())
    }

    fn bind(
        &mut self,
        walker: &mut Walker<'_>,
        path: &str,
        default: Option<&str>,
    ) -> ProfileResult<()> {
        walker.leaf(self, path, default)
    }
}

impl<T, S> Bind for HashMap<String, T, S>
where
    T: Bind + DeserializeOwned,
    S: BuildHasher + Default,
{
    fn kind() -> FieldKind {
        FieldKind::mapping(T::kind())
    }

    fn bind(
        &mut self,
        walker: &mut Walker<'_>,
        path: &str,
        default: Option<&str>,
    ) -> ProfileResult<()> {
        walker.leaf(self, path, default)
    }
}
