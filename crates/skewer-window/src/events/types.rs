use skewer_core::InputEvent;
use winit::dpi::PhysicalSize;

#[derive(Debug, Clone)]
pub enum SkewerWindowEvent {
    Resized(PhysicalSize<u32>),
    ScaleFactorChanged(f64),
    /// A fresh key press that maps onto a trigger id or quit.
    Input(InputEvent),
    RedrawRequested,
    CloseRequested,
}
