use crate::geometry::FloatType;

pub type Color3 = rgb::RGB<FloatType>;

pub const BLACK: Color3 = Color3 {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

pub const WHITE: Color3 = Color3 {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};
