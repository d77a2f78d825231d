use hvml_tokenizer::{Tokenizer, TokenizerOptions, VecSink};

#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut tokenizer = Tokenizer::new(VecSink::default(), TokenizerOptions::default());
        tokenizer.feed(data);
        let _ = tokenizer.finish();
    });
}
