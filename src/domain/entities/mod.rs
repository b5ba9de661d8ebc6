mod link;
mod product;
mod theme;
mod user;

pub use link::{Link, LinkPatch, NewLink};
pub use product::{NewProduct, Product, ProductPatch};
pub use theme::{
    ButtonAnimation, ButtonBorder, ButtonShadow, ButtonStyle, FontFamily, FontSize, FontWeight,
    LayoutWidth, ProfileShape, ProfileSize, Spacing, Theme, ThemeSettings,
};
pub use user::{NewUser, User, UserPatch};
