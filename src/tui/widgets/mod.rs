pub mod common;
pub mod form_field;
pub mod modal_dialog;
pub mod otp_input;
pub mod picker;
pub mod schedule_form;
pub mod tab_bar;
pub mod text_input;
pub mod toggle_list;

pub use form_field::{apply_errors, focus_field, FormField, ValidationState};
pub use modal_dialog::{DialogType, ModalDialog};
pub use otp_input::{OtpEvent, OtpInput};
pub use picker::{OptionPicker, PickerOutcome};
pub use schedule_form::{Schedule, ScheduleForm, ScheduleOutcome};
pub use tab_bar::TabBar;
pub use text_input::TextInput;
pub use toggle_list::ToggleList;
