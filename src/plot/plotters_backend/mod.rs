use super::{Curve, Figure};
use plotters::prelude::*;

static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
static SIZE: (u32, u32) = (960, 540);
static POINT_SIZE: u32 = 3;

mod summary;

pub(crate) use self::summary::line_comparison;
