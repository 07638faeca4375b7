//! Walk the default demo tree with every algorithm, step by step.

use stepwise::{Algorithm, Controller, RecordingRenderer, StructureKind};

fn main() {
    let mut controller = Controller::new(RecordingRenderer::default());
    controller.set_structure_mode(StructureKind::BinaryTree);

    for algorithm in Algorithm::ALL {
        // Binary search re-sorts the data, so reload before each walk.
        controller.load_text("5, 3, 8, 1, 4, 7, 9, 0");
        controller.select_algorithm(algorithm);
        controller.set_target("7");
        controller.renderer_mut().clear();

        while !controller.step().is_terminal() {}

        let visited = controller.renderer().visited();
        println!("{:<26} {:?}", algorithm.label(), visited);
        if let Some(status) = controller.renderer().last_status() {
            println!("{:<26} {}", "", status);
        }
    }
}
