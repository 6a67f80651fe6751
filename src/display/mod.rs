pub mod canvas;
pub mod driver;
pub mod graphics;
pub mod scroll;
pub mod update_loop;
