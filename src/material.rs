use std::fmt;
use std::str::FromStr;

use crate::error::{MaterialError, Result};

/// A linear RGB colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

macro_rules! named_materials {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every material of this kind.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Catalogue name of the material.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = MaterialError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Self::$variant),)+
                    _ => Err(MaterialError::UnknownMaterial(s.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_materials! {
    /// Metal of conductors, braids and armour.
    ConductorMaterial {
        Copper => "cu";
        TinnedCopper => "cu-t";
        Aluminium => "al";
        Iron => "fe";
        IronZinc => "fe_zn";
    }
}

named_materials! {
    /// Plastic of insulators and fillers. The colour is chosen per object.
    InsulatorMaterial {
        Pvc => "pvc";
        Pe => "pe";
        Ldpe => "ldpe";
        Pur => "pur";
        Epd => "epd";
        Fill => "fill";
        FillRope => "fill_rope";
    }
}

impl ConductorMaterial {
    /// Base colour of the metal.
    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Copper => Rgb::new(0.603, 0.093, 0.0),
            Self::TinnedCopper => Rgb::new(0.603, 0.603, 0.603),
            Self::Aluminium | Self::Iron => Rgb::new(0.666_654, 0.590_356, 0.748_414),
            Self::IronZinc => Rgb::new(0.2, 0.2, 0.2),
        }
    }
}

named_materials! {
    /// Tape wrapped around a cable core.
    LapMaterial {
        Nylon => "nylon";
        Chrome => "chrome";
        Plastic => "plastic";
    }
}

impl LapMaterial {
    /// Base colour of the tape.
    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Nylon => Rgb::new(0.6, 0.6, 0.6),
            Self::Chrome => Rgb::new(0.603, 0.603, 0.603),
            Self::Plastic => Rgb::new(0.8, 0.8, 0.8),
        }
    }
}

const INSULATOR_COLORS: &[(&str, Rgb)] = &[
    ("red", Rgb::new(0.246, 0.0, 0.005)),
    ("green", Rgb::new(0.013, 0.549, 0.025)),
    ("blue", Rgb::new(0.013, 0.07, 0.549)),
    ("beige", Rgb::new(0.638_264, 0.533_126, 0.387_854)),
    ("brown", Rgb::new(0.098, 0.02, 0.01)),
    ("pink", Rgb::new(0.8, 0.084, 0.0332)),
    ("black", Rgb::new(0.007, 0.007, 0.007)),
    ("white", Rgb::new(0.8, 0.8, 0.8)),
    ("grey", Rgb::new(0.173, 0.173, 0.173)),
    ("orange", Rgb::new(0.8, 0.136, 0.019)),
    ("purple", Rgb::new(0.339, 0.044, 0.549)),
    ("yellow", Rgb::new(0.532, 0.549, 0.004)),
    ("cyan", Rgb::new(0.012, 0.326, 0.274)),
    ("kraft-green", Rgb::new(0.006, 0.095, 0.022)),
];

/// A two-tone insulator pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripeType {
    /// Pattern name, e.g. `"gr/ye"`.
    pub name: &'static str,
    /// Plain colour name of the majority wedge.
    pub base: &'static str,
    /// Plain colour name of the stripe.
    pub stripe: &'static str,
    /// Fraction of the circumference taken by the stripe.
    pub amount: f64,
    /// Whether the stripe is split into two opposite wedges.
    pub double_sided: bool,
}

const fn stripe(
    name: &'static str,
    base: &'static str,
    stripe: &'static str,
    amount: f64,
    double_sided: bool,
) -> StripeType {
    StripeType {
        name,
        base,
        stripe,
        amount,
        double_sided,
    }
}

const STRIPE_TYPES: &[StripeType] = &[
    stripe("gr/ye", "green", "yellow", 0.4, true),
    stripe("d-black", "white", "black", 0.5, false),
    stripe("d-grey", "white", "grey", 0.5, false),
    stripe("d-red", "white", "red", 0.5, false),
    stripe("d-blue", "white", "blue", 0.5, false),
    stripe("d-brown", "white", "brown", 0.5, false),
    stripe("d-yellow", "white", "yellow", 0.5, false),
    stripe("d-green", "white", "green", 0.5, false),
    stripe("d-orange", "white", "orange", 0.5, false),
    stripe("d-pink", "white", "pink", 0.5, false),
    stripe("d-purple", "white", "purple", 0.5, false),
    stripe("ye/red_50/50", "yellow", "red", 0.5, true),
    stripe("red/black_50/50", "red", "black", 0.5, true),
    stripe("red/blue_50/50", "red", "blue", 0.5, true),
    stripe("red/yellow_50/50", "red", "yellow", 0.5, true),
    stripe("black/white_50/50", "black", "white", 0.5, true),
    stripe("green/white_50/50", "green", "white", 0.5, true),
    stripe("blue/white_50/50", "blue", "white", 0.5, true),
    stripe("yellow/white_50/50", "yellow", "white", 0.5, true),
    stripe("red/white_50/50", "red", "white", 0.5, true),
    stripe("pink/white_50/50", "pink", "white", 0.5, true),
    stripe("purple/white_50/50", "purple", "white", 0.5, true),
    stripe("grey/white_50/50", "grey", "white", 0.5, true),
    stripe("brown/white_50/50", "brown", "white", 0.5, true),
    stripe("gr/purp_90/10", "green", "purple", 0.1, false),
    stripe("ye/gr_70/30", "yellow", "green", 0.3, true),
    stripe("white/blue_90/10", "white", "blue", 0.1, false),
    stripe("white/orange_90/10", "white", "orange", 0.1, false),
    stripe("white/green_90/10", "white", "green", 0.1, false),
    stripe("white/brown_90/10", "white", "brown", 0.1, false),
];

/// Looks up a plain insulator colour by name.
#[must_use]
pub fn insulator_color(name: &str) -> Option<Rgb> {
    INSULATOR_COLORS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|&(_, rgb)| rgb)
}

/// Looks up a stripe pattern by name.
#[must_use]
pub fn stripe_type(name: &str) -> Option<&'static StripeType> {
    STRIPE_TYPES.iter().find(|s| s.name == name)
}

/// Names of every plain colour and stripe pattern, in catalogue order.
pub fn color_names() -> impl Iterator<Item = &'static str> {
    INSULATOR_COLORS
        .iter()
        .map(|(name, _)| *name)
        .chain(STRIPE_TYPES.iter().map(|s| s.name))
}

/// The resolved look of an insulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsulatorFinish {
    /// One colour all around.
    Plain(Rgb),
    /// A base colour with a stripe.
    Striped {
        base: Rgb,
        stripe: Rgb,
        amount: f64,
        double_sided: bool,
    },
}

impl InsulatorFinish {
    /// Resolves a colour or stripe pattern name.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidColor`] if the name is neither.
    pub fn resolve(name: &str) -> Result<Self> {
        if let Some(rgb) = insulator_color(name) {
            return Ok(Self::Plain(rgb));
        }
        let invalid = || MaterialError::InvalidColor(name.to_string());
        let pattern = stripe_type(name).ok_or_else(invalid)?;
        Ok(Self::Striped {
            base: insulator_color(pattern.base).ok_or_else(invalid)?,
            stripe: insulator_color(pattern.stripe).ok_or_else(invalid)?,
            amount: pattern.amount,
            double_sided: pattern.double_sided,
        })
    }
}

/// What an object is made of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialRequest {
    Conductor(ConductorMaterial),
    Insulator { material: InsulatorMaterial, color: Rgb },
    Lap(LapMaterial),
}

/// Opaque reference to a material owned by a [`MaterialResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);

/// Turns material requests into host material handles.
///
/// The engine never builds shaders. Builders describe what an object is
/// made of with a [`MaterialRequest`] and the resolver hands back an opaque
/// [`MaterialHandle`] the host understands.
pub trait MaterialResolver {
    /// Returns the handle for `request`, creating the material if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot provide the material.
    fn resolve(&mut self, request: &MaterialRequest) -> Result<MaterialHandle>;
}

/// In-memory resolver that hands out one handle per distinct request.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<MaterialRequest>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the request behind `handle`.
    #[must_use]
    pub fn get(&self, handle: MaterialHandle) -> Option<&MaterialRequest> {
        self.materials.get(handle.0 as usize)
    }

    /// Number of distinct materials created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if no material has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialResolver for MaterialLibrary {
    fn resolve(&mut self, request: &MaterialRequest) -> Result<MaterialHandle> {
        let index = match self.materials.iter().position(|m| m == request) {
            Some(index) => index,
            None => {
                self.materials.push(*request);
                self.materials.len() - 1
            }
        };
        let index = u32::try_from(index)
            .map_err(|_| MaterialError::UnknownMaterial("material library is full".into()))?;
        Ok(MaterialHandle(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalogue_names() {
        assert_eq!("cu-t".parse::<ConductorMaterial>().unwrap(), ConductorMaterial::TinnedCopper);
        assert_eq!("fill_rope".parse::<InsulatorMaterial>().unwrap(), InsulatorMaterial::FillRope);
        assert_eq!("chrome".parse::<LapMaterial>().unwrap(), LapMaterial::Chrome);
        for m in ConductorMaterial::ALL {
            assert_eq!(m.name().parse::<ConductorMaterial>().unwrap(), *m);
        }
    }

    #[test]
    fn unknown_material_name() {
        assert!(matches!(
            "pex".parse::<InsulatorMaterial>(),
            Err(MaterialError::UnknownMaterial(name)) if name == "pex"
        ));
    }

    #[test]
    fn later_red_wins() {
        assert_eq!(insulator_color("red"), Some(Rgb::new(0.246, 0.0, 0.005)));
    }

    #[test]
    fn d_red_is_single_sided_half_stripe() {
        let finish = InsulatorFinish::resolve("d-red").unwrap();
        assert_eq!(
            finish,
            InsulatorFinish::Striped {
                base: Rgb::new(0.8, 0.8, 0.8),
                stripe: Rgb::new(0.246, 0.0, 0.005),
                amount: 0.5,
                double_sided: false,
            }
        );
    }

    #[test]
    fn plain_colour() {
        assert_eq!(
            InsulatorFinish::resolve("kraft-green").unwrap(),
            InsulatorFinish::Plain(Rgb::new(0.006, 0.095, 0.022))
        );
    }

    #[test]
    fn unknown_colour_is_invalid_color() {
        let err = InsulatorFinish::resolve("mauve").unwrap_err();
        assert!(err.is_invalid_color());
        assert_eq!(err.to_string(), "\"mauve\" is not a valid colour");
    }

    #[test]
    fn every_stripe_references_known_colours() {
        for name in color_names() {
            assert!(InsulatorFinish::resolve(name).is_ok(), "{name}");
        }
        assert_eq!(color_names().count(), 14 + 30);
    }

    #[test]
    fn library_deduplicates_requests() {
        let mut lib = MaterialLibrary::new();
        let cu = MaterialRequest::Conductor(ConductorMaterial::Copper);
        let pvc_red = MaterialRequest::Insulator {
            material: InsulatorMaterial::Pvc,
            color: insulator_color("red").unwrap(),
        };
        let a = lib.resolve(&cu).unwrap();
        let b = lib.resolve(&pvc_red).unwrap();
        let c = lib.resolve(&cu).unwrap();
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.get(b), Some(&pvc_red));
    }
}
