pub mod button_effect;
