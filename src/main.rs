fn main() {
    tour_lib::run()
}
