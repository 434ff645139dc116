pub mod tmpl;
