//! Exact arithmetic for cell values.
//!
//! Toppling only ever divides a non-negative excess by a positive share
//! count, so truncating division with remainder is all the models need.
//! `BigInt` is the general purpose cell type; `i64` is a fast path guarded
//! by documented initial value bounds.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

use crate::error::{AetherError, AetherResult};

/// Lowest `i64` initial value accepted by 1D models.
pub const I64_MIN_INITIAL_VALUE_1D: i64 = -9223372036854775807;

/// Lowest `i64` initial value accepted by 2D models.
pub const I64_MIN_INITIAL_VALUE_2D: i64 = -6148914691236517205;

/// Lowest `i64` initial value accepted by 3D models.
pub const I64_MIN_INITIAL_VALUE_3D: i64 = -3689348814741910323;

/// Lowest `i64` initial value accepted by 4D models.
pub const I64_MIN_INITIAL_VALUE_4D: i64 = -2635249153387078803;

/// Lowest `i64` initial value accepted by 5D models.
pub const I64_MIN_INITIAL_VALUE_5D: i64 = -2049638230412172401;

/// Highest `i64` initial value accepted by every model.
pub const I64_MAX_INITIAL_VALUE: i64 = i64::MAX;

/// A cell value with exact, non-rounding integer arithmetic.
///
/// Sources may be negative, so the type must be signed.
pub trait CellValue:
    Integer + Signed + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    /// Lifts a neighbor count or share multiplier into the value domain.
    fn from_count(count: u32) -> Self;

    /// Inclusive initial value bounds for a model of `dimension`, or `None`
    /// when the type cannot overflow.
    fn initial_value_bounds(dimension: usize) -> AetherResult<Option<(Self, Self)>>;

    /// Truncating division by a share count, returning `(share, remainder)`.
    fn divide_with_remainder(&self, divisor: u32) -> (Self, Self) {
        debug_assert!(divisor > 0, "share count must be positive");
        self.div_rem(&Self::from_count(divisor))
    }

    /// Rejects initial values that could overflow this type.
    fn check_initial_value(value: &Self, dimension: usize) -> AetherResult<()> {
        match Self::initial_value_bounds(dimension)? {
            Some((min, max)) if *value < min || *value > max => {
                Err(AetherError::InitialValueOutOfRange {
                    value: value.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                    dimension,
                })
            }
            _ => Ok(()),
        }
    }
}

impl CellValue for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn from_count(count: u32) -> Self {
        i64::from(count)
    }

    fn initial_value_bounds(dimension: usize) -> AetherResult<Option<(Self, Self)>> {
        let min = match dimension {
            1 => I64_MIN_INITIAL_VALUE_1D,
            2 => I64_MIN_INITIAL_VALUE_2D,
            3 => I64_MIN_INITIAL_VALUE_3D,
            4 => I64_MIN_INITIAL_VALUE_4D,
            5 => I64_MIN_INITIAL_VALUE_5D,
            _ => {
                return Err(AetherError::UnsupportedDimension {
                    dimension,
                    cell_type: Self::TYPE_NAME,
                })
            }
        };
        Ok(Some((min, I64_MAX_INITIAL_VALUE)))
    }
}

impl CellValue for BigInt {
    const TYPE_NAME: &'static str = "BigInt";

    fn from_count(count: u32) -> Self {
        BigInt::from(count)
    }

    fn initial_value_bounds(_dimension: usize) -> AetherResult<Option<(Self, Self)>> {
        Ok(None)
    }
}
