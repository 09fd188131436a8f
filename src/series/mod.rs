pub mod time_series;
