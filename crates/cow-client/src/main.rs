fn main() {
    cow_client::start(std::env::args());
}
