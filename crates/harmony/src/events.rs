use harmony_wheel::WheelEvent;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Wheel(WheelEvent),
    ConfigReload,
}
