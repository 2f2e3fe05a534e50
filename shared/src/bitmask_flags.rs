use num_traits::{One, PrimInt};

/// Trait implemented by flag enums whose discriminant is a bit index.
///
/// The backing integer type is chosen through the associated `Storage`, so a wire field that
/// only ever carries a handful of bits (the input button mask) can stay a `u8`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container over a primitive integer.
///
/// This is the in-memory form of a wire bitmask: the raw `bits` are exactly what travels over
/// the transport, and flag enums give the individual bits names.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> T {
        self.bits
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits & !tag.mask();
    }

    pub fn set<U: FlagBitmask<Storage = T>>(&mut self, tag: U, on: bool) {
        if on {
            self.add(tag);
        } else {
            self.remove(tag);
        }
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Variants take bit indices in declaration order, starting at 0.
///
/// ```rust
/// shared::define_bitmask_flags!(Status, u8, {
///     Grounded,
///     Hooked,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_bitmask_flags!(Probe, u8, { A, B, C });

    #[test]
    fn variants_map_to_declaration_order_bits() {
        assert_eq!(Probe::A.mask(), 0b001);
        assert_eq!(Probe::B.mask(), 0b010);
        assert_eq!(Probe::C.mask(), 0b100);
    }

    #[test]
    fn add_remove_and_set_toggle_single_bits() {
        let mut flags = BitmaskFlags::<u8>::default();
        flags.add(Probe::A);
        flags.set(Probe::C, true);
        assert_eq!(flags.bits(), 0b101);

        flags.remove(Probe::A);
        flags.set(Probe::C, false);
        assert_eq!(flags.bits(), 0);
    }
}
