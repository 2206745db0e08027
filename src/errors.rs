// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
// ResultExt adds the `chain_err` trait method.
use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be odd and at least 3",
                    width, height)
        }

        AlreadyGenerated {
            description("maze already generated")
            display("the maze has already been generated, create a new generator for another maze")
        }

        Export(path: String) {
            description("maze export failed")
            display("failed to export maze to '{}'", path)
        }

        Renderer(message: String) {
            description("maze renderer failure")
            display("maze renderer failure: {}", message)
        }
    }
}
