pub(crate) mod builtin_font;
pub(crate) mod decode;
pub(crate) mod font;
pub(crate) mod text;
