pub mod pollutant_frame;
