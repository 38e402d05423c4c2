pub mod history_csv;
