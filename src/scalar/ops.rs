//! Implementations of `std::ops`.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Scalar;

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Self::Output {
        if self.is_zero() {
            return self;
        }
        Scalar {
            negative: !self.negative,
            ..self
        }
    }
}

macro_rules! binop {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident => $checked:ident, $verb:literal;)+) => {
        $(
            #[doc = concat!("Panics if [`Scalar::", stringify!($checked), "`] would return an error.")]
            impl $trait for Scalar {
                type Output = Scalar;

                #[track_caller]
                fn $method(self, rhs: Scalar) -> Self::Output {
                    match self.$checked(rhs) {
                        Ok(result) => result,
                        Err(e) => panic!(concat!("attempt to ", $verb, " `{}` and `{}` failed: {}"), self, rhs, e),
                    }
                }
            }

            impl $assign_trait for Scalar {
                #[track_caller]
                fn $assign_method(&mut self, rhs: Scalar) {
                    *self = $trait::$method(*self, rhs);
                }
            }
        )+
    };
}

binop! {
    Add, add, AddAssign, add_assign => try_add, "add";
    Sub, sub, SubAssign, sub_assign => try_sub, "subtract";
    Mul, mul, MulAssign, mul_assign => try_mul, "multiply";
    Div, div, DivAssign, div_assign => try_div, "divide";
}
