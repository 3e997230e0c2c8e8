//! Stepping through the variants of field-less enums

/// An enum whose variants form a ring
///
/// `next` on the last variant wraps to the first and `previous` on the first
/// wraps to the last. Implement it with [`impl_cyclic!`](crate::impl_cyclic).
pub trait Cyclic: Copy + PartialEq + 'static {
    /// Every variant in declaration order
    const VARIANTS: &'static [Self];

    /// Position of `self` in [`Self::VARIANTS`]
    fn position(self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|&v| v == self)
            .unwrap_or(0)
    }

    /// The variant after this one
    fn next(self) -> Self {
        let variants = Self::VARIANTS;
        variants[(self.position() + 1) % variants.len()]
    }

    /// The variant before this one
    fn previous(self) -> Self {
        let variants = Self::VARIANTS;
        variants[(self.position() + variants.len() - 1) % variants.len()]
    }
}

/// Implement [`Cyclic`] for a field-less enum by listing its variants
///
/// ```
/// use toolbelt_core::enums::Cyclic;
/// use toolbelt_core::impl_cyclic;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Light {
///     Red,
///     Amber,
///     Green,
/// }
///
/// impl_cyclic!(Light: Red, Amber, Green);
///
/// assert_eq!(Light::Green.next(), Light::Red);
/// assert_eq!(Light::Red.previous(), Light::Green);
/// ```
#[macro_export]
macro_rules! impl_cyclic {
    ($ty:ty: $($variant:ident),+ $(,)?) => {
        impl $crate::enums::Cyclic for $ty {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_size::ByteUnit;
    use crate::file_finder::SortKey;

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(ByteUnit::Kilobyte.next(), ByteUnit::Megabyte);
        assert_eq!(ByteUnit::Gigabyte.next(), ByteUnit::Terabyte);
        assert_eq!(ByteUnit::Terabyte.next(), ByteUnit::Kilobyte);
    }

    #[test]
    fn test_previous_wraps_around() {
        assert_eq!(ByteUnit::Megabyte.previous(), ByteUnit::Kilobyte);
        assert_eq!(ByteUnit::Kilobyte.previous(), ByteUnit::Terabyte);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut key = SortKey::Name;
        for _ in 0..SortKey::VARIANTS.len() {
            key = key.next();
        }
        assert_eq!(key, SortKey::Name);

        for variant in SortKey::VARIANTS {
            assert_eq!(variant.next().previous(), *variant);
        }
    }

    #[test]
    fn test_single_variant_enum() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Only {
            One,
        }
        crate::impl_cyclic!(Only: One);

        assert_eq!(Only::One.next(), Only::One);
        assert_eq!(Only::One.previous(), Only::One);
        assert_eq!(Only::One.position(), 0);
    }
}
