mod helpers;
mod integration_stream;
