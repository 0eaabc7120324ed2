//! Document model types consumed through the host interface.

mod document;
mod effect;
mod node;
mod paint;
mod variable;

pub use document::{Document, Page, PaintStyle};
pub use effect::{BlurEffect, Effect, NoiseEffect, ShadowEffect, Vector};
pub use node::{find_node, find_node_mut, Fills, MixedMarker, Node, NodeType};
pub use paint::{BlendMode, ColorStop, GradientPaint, ImagePaint, Paint, SolidPaint};
pub use variable::{ModeValues, Variable, VariableAlias, VariableValue};
