// Signup, login and bearer-token authentication. Hashing is bcrypt and tokens
// are HS256 JWTs; neither scheme is implemented here.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod store;
pub mod token;
