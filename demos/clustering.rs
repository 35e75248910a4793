//! Load the sample point file and run a few k-means passes.

use kmeans2d::{ClusteringService, Snapshot, SnapshotObserver};

/// Prints every snapshot the service emits.
struct ConsoleView;

impl SnapshotObserver for ConsoleView {
    fn snapshot(&mut self, snapshot: &Snapshot) {
        if let Some(b) = snapshot.bounds {
            println!(
                "view box: x [{}, {}], y [{}, {}]",
                b.min_x, b.max_x, b.min_y, b.max_y
            );
        }
        for mean in &snapshot.means {
            println!(
                "  mean at ({:4}, {:4})  color ({:.2}, {:.2}, {:.2})",
                mean.x, mean.y, mean.color.r, mean.color.g, mean.color.b
            );
        }
    }
}

fn main() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/points.txt");

    let mut service = ClusteringService::new()
        .with_seed(42)
        .with_observer(Box::new(ConsoleView));

    let snapshot = service.open(path).expect("sample file should load");
    println!("loaded {} points from {path}", snapshot.points.len());

    service.set_k(3);
    for pass in 1..=5 {
        println!("\n=== pass {pass} ===");
        service.cluster();
    }

    let snapshot = service.cluster();
    println!("\nfinal assignment:");
    for point in &snapshot.points {
        println!(
            "  {:8} ({:4}, {:4})  color ({:.2}, {:.2}, {:.2})",
            point.name, point.x, point.y, point.color.r, point.color.g, point.color.b
        );
    }
}
