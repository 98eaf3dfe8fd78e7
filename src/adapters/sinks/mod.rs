pub mod csv_row_sink;
