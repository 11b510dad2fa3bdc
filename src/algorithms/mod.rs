pub mod normalize;
pub mod predict;
pub mod topk;
pub mod windows;
