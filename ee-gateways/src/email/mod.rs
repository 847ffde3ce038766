pub mod send_to_json_file;
pub mod sendgrid;
