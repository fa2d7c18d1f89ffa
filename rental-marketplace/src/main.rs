fn main() {
    rental_marketplace::server::run();
}
