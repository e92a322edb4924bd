//! Just the `XY` type.

use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// A position or size, with an X and a Y component.
///
/// You can add and subtract `XY`s elementwise with other `XY`s (e.g. `XY(2, 3) + XY(4, 5) == XY(6, 8)`), with tuples,
/// and with scalars (e.g. `XY(2, 3) + 4 == XY(6, 7)`).
///
/// When used as a position, `XY(0, 0)` is at the top left of the screen, and `XY(0, 1)` is just below it -- the usual
/// "graphics axes".
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct XY(pub usize, pub usize);

impl XY {
    /// The X component
    pub const fn x(&self) -> usize {
        self.0
    }

    /// The Y component
    pub const fn y(&self) -> usize {
        self.1
    }

    /// Whether this position lies inside the rectangle starting at `top_left` with the given `size`.
    pub fn within(self, top_left: XY, size: XY) -> bool {
        self.0 >= top_left.0
            && self.1 >= top_left.1
            && self.0 < top_left.0 + size.0
            && self.1 < top_left.1 + size.1
    }
}

macro_rules! xy_op {
    ( $(
        $trait:ident($fn:ident) => $op:tt $assn_op:tt
    );* $(;)? ) => {
        $(
            impl $trait for XY {
                type Output = XY;
                fn $fn(self, rhs: XY) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            impl $trait<(usize, usize)> for XY {
                type Output = XY;
                fn $fn(self, rhs: (usize, usize)) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            impl $trait<usize> for XY {
                type Output = XY;
                fn $fn(self, rhs: usize) -> XY {
                    XY(self.0 $op rhs, self.1 $op rhs)
                }
            }

            paste::paste! {
                impl [< $trait Assign >] for XY {
                    fn [< $fn _assign >] (&mut self, rhs: XY) {
                        self.0 $assn_op rhs.0;
                        self.1 $assn_op rhs.1;
                    }
                }
            }
        )*
    };
}

xy_op! {
    Add(add) => + +=;
    Sub(sub) => - -=;
}

impl fmt::Display for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl fmt::Debug for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XY({}, {})", self.0, self.1)
    }
}

impl From<(usize, usize)> for XY {
    fn from(f: (usize, usize)) -> XY {
        XY(f.0, f.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn xy_ops_are_elementwise() {
        assert_eq!(XY(2, 3) + XY(4, 5), XY(6, 8));
        assert_eq!(XY(4, 5) - (1, 2), XY(3, 3));
        assert_eq!(XY(2, 3) + 4, XY(6, 7));
        let mut pos = XY(1, 1);
        pos += XY(2, 0);
        assert_eq!(pos, XY(3, 1));
    }

    #[test]
    fn within_is_half_open() {
        let tl = XY(2, 3);
        let size = XY(4, 2);
        assert!(XY(2, 3).within(tl, size));
        assert!(XY(5, 4).within(tl, size));
        assert!(!XY(6, 4).within(tl, size));
        assert!(!XY(5, 5).within(tl, size));
        assert!(!XY(1, 3).within(tl, size));
    }
}
