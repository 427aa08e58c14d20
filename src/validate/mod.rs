pub mod validator;
pub mod violation;
