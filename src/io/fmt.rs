//! CLI-compatible text formatting.
//!
//! This is the 'lowest common subset' of what terminals can do: 16 basic [`Color`]s for foreground and background,
//! plus bold and underline.

/// The color of a piece of formatted text. Meant to be used through `Text` / `text!`. The numeric values are the ANSI
/// color codes for each color; that's also where the actual colors are from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 60,
    BrightRed = 61,
    BrightGreen = 62,
    BrightYellow = 63,
    BrightBlue = 64,
    BrightMagenta = 65,
    BrightCyan = 66,
    BrightWhite = 67,
}

/// The format of a single formatted item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    /// The foreground color of the item
    pub fg: Color,
    /// The background color of the item
    pub bg: Color,
    /// Whether it's bolded or not
    pub bold: bool,
    /// Whether it's underlined or not
    pub underline: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::White,
        bg: Color::Black,
        bold: false,
        underline: false,
    };
}

impl Default for Format {
    fn default() -> Self {
        Self::NONE
    }
}

macro_rules! fmt_fn {
    ( $(
        $name:ident
        $(( $( $arg:ident: $type:ty ),* $(,)? ))?
        =>
        $field:ident
        = $val:expr
    ),* $(,)? ) => { $(
        #[must_use]
        fn $name(mut self $($(, $arg: $type )*)? ) -> Self {
            self.get_fmt_mut().$field = $val;
            self
        }
    )* };
}

/// Trait implemented by all formattable items (`Text` and `Cell`).
pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

/// Provides common formatting operations on anything implementing [`Formatted`].
pub trait FormattedExt: Formatted + Sized {
    /// Copy another item's formatting into this one.
    ///
    /// The two objects don't need to be the same type, e.g. you can copy a [`Text`]'s formatting to a [`Cell`].
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = rhs.get_fmt().clone();
        self
    }
    fmt_fn! {
        bright_black => fg = Color::BrightBlack,
        red => fg = Color::Red,
        green => fg = Color::Green,
        yellow => fg = Color::Yellow,
        bright_yellow => fg = Color::BrightYellow,
        cyan => fg = Color::Cyan,
        bright_white => fg = Color::BrightWhite,
        underline => underline = true,
        bold => bold = true,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $( $fvis:vis $field:ident: $type:ty ),* $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $( $fvis $field: $type, )*
            _fmt: $crate::io::fmt::Format,
        }
        impl $crate::io::fmt::Formatted for $name {
            fn get_fmt(&self) -> &$crate::io::fmt::Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut $crate::io::fmt::Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of( $($field: $type),* ) -> Self {
                Self {
                    $( $field, )*
                    _fmt: $crate::io::fmt::Format::NONE,
                }
            }
        }
    };
}

fmt_type!(
    /// A single bit of formatted text. The API is designed to be used through `text!`, i.e. as a `Vec<Text>`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text {
        pub text: String,
    }
);

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }
}

/// Create a series of formatted [`Text`]s.
#[macro_export]
macro_rules! text {
    [ $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),* $(,)? ] => {
        {
            #[allow(unused_imports)]
            use $crate::io::fmt::{FormattedExt as _};
            vec![
                $(
                    $crate::io::fmt::Text::of(
                        format!( $text $(, $( $arg ),* )? )
                    ) $( . $name () )*
                ),*
            ]
        }
    };
}

fmt_type! {
    /// A single character that's been formatted. This is really only meant to be used in `Screen`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

impl Cell {
    /// A blank cell with default formatting.
    pub const BLANK: Cell = Cell::of(' ');
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_macro_applies_formatting() {
        let texts = crate::text!["plain ", bold yellow "score {}"(3)];
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].text, "plain ");
        assert_eq!(texts[0].get_fmt(), &Format::NONE);
        assert_eq!(texts[1].text, "score 3");
        assert!(texts[1].get_fmt().bold);
        assert_eq!(texts[1].get_fmt().fg, Color::Yellow);
    }

    #[test]
    fn fmt_of_copies_between_types() {
        let text = Text::plain("x").red().underline();
        let cell = Cell::of('x').fmt_of(&text);
        assert_eq!(cell.get_fmt(), text.get_fmt());
    }
}
