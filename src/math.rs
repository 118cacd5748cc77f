use bevy::math::{IVec3, UVec3, Vec3};

pub type Real = f32;
pub type Vector = Vec3;
pub type GridCoord = IVec3;
pub type GridSize = UVec3;

pub const PI: Real = std::f32::consts::PI;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec3::ZERO
}

#[inline(always)]
pub fn sqr(x: Real) -> Real {
    x * x
}

#[inline(always)]
pub fn cube(x: Real) -> Real {
    x * x * x
}

#[inline(always)]
pub fn pow6(x: Real) -> Real {
    cube(x) * cube(x)
}

#[inline(always)]
pub fn pow9(x: Real) -> Real {
    pow6(x) * cube(x)
}
